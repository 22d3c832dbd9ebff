//! Market, OrderSide, and Wallet enums

use std::sync::OnceLock;

use crate::wire::{impl_wire_traits, WireEnum, WireTable};

/// Tradeable market (asset/currency pair)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Market {
    /// Ether / Argentine peso
    #[default]
    EthArs,
    /// Ether / Euro
    EthEur,
    /// Ether / Brazilian real
    EthBrl,
    /// Stellar lumen / Argentine peso
    XlmArs,
    /// Stellar lumen / Euro
    XlmEur,
    /// Stellar lumen / Brazilian real
    XlmBrl,
    /// Bitcoin / Argentine peso
    BtcArs,
    /// Bitcoin / Euro
    BtcEur,
    /// Bitcoin / Brazilian real
    BtcBrl,
    /// Ether / Chilean peso
    EthClp,
    /// Stellar lumen / Chilean peso
    XlmClp,
    /// Bitcoin / Chilean peso
    BtcClp,
}

impl Market {
    /// Every market, in wire-table order
    pub const ALL: &'static [Market] = &[
        Self::EthArs,
        Self::EthEur,
        Self::EthBrl,
        Self::XlmArs,
        Self::XlmEur,
        Self::XlmBrl,
        Self::BtcArs,
        Self::BtcEur,
        Self::BtcBrl,
        Self::EthClp,
        Self::XlmClp,
        Self::BtcClp,
    ];

    fn wire(&self) -> &'static str {
        match self {
            Self::EthArs => "ETHARS",
            Self::EthEur => "ETHEUR",
            Self::EthBrl => "ETHBRL",
            Self::XlmArs => "XLMARS",
            Self::XlmEur => "XLMEUR",
            Self::XlmBrl => "XLMBRL",
            Self::BtcArs => "BTCARS",
            Self::BtcEur => "BTCEUR",
            Self::BtcBrl => "BTCBRL",
            Self::EthClp => "ETHCLP",
            Self::XlmClp => "XLMCLP",
            Self::BtcClp => "BTCCLP",
        }
    }

    /// Every market
    pub fn all() -> &'static [Market] {
        Self::ALL
    }

    /// The traded asset (e.g. BTC for BTCCLP)
    pub fn asset(&self) -> Wallet {
        match self {
            Self::EthArs | Self::EthBrl | Self::EthClp | Self::EthEur => Wallet::Eth,
            Self::XlmArs | Self::XlmBrl | Self::XlmClp | Self::XlmEur => Wallet::Xlm,
            Self::BtcArs | Self::BtcBrl | Self::BtcClp | Self::BtcEur => Wallet::Btc,
        }
    }

    /// The quote currency (e.g. CLP for BTCCLP)
    pub fn currency(&self) -> Wallet {
        match self {
            Self::EthArs | Self::XlmArs | Self::BtcArs => Wallet::Ars,
            Self::EthBrl | Self::XlmBrl | Self::BtcBrl => Wallet::Brl,
            Self::EthClp | Self::XlmClp | Self::BtcClp => Wallet::Clp,
            Self::EthEur | Self::XlmEur | Self::BtcEur => Wallet::Eur,
        }
    }
}

impl WireEnum for Market {
    fn table() -> &'static WireTable<Self> {
        static TABLE: OnceLock<WireTable<Market>> = OnceLock::new();
        TABLE.get_or_init(|| WireTable::new("Market", Market::ALL, Market::wire))
    }

    fn as_str(&self) -> &'static str {
        self.wire()
    }
}

impl_wire_traits!(Market);

/// Order side, sent as `type` on order endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderSide {
    /// Buy order
    #[default]
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Both sides
    pub const ALL: &'static [OrderSide] = &[Self::Buy, Self::Sell];

    fn wire(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl WireEnum for OrderSide {
    fn table() -> &'static WireTable<Self> {
        static TABLE: OnceLock<WireTable<OrderSide>> = OnceLock::new();
        TABLE.get_or_init(|| WireTable::new("OrderSide", OrderSide::ALL, OrderSide::wire))
    }

    fn as_str(&self) -> &'static str {
        self.wire()
    }
}

impl_wire_traits!(OrderSide);

/// Wallet currency or asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wallet {
    /// Argentine peso
    #[default]
    Ars,
    /// Brazilian real
    Brl,
    /// Chilean peso
    Clp,
    /// Euro
    Eur,
    /// Ether
    Eth,
    /// Stellar lumen
    Xlm,
    /// Bitcoin
    Btc,
}

impl Wallet {
    /// Every wallet, in wire-table order
    pub const ALL: &'static [Wallet] = &[
        Self::Ars,
        Self::Brl,
        Self::Clp,
        Self::Eur,
        Self::Eth,
        Self::Xlm,
        Self::Btc,
    ];

    fn wire(&self) -> &'static str {
        match self {
            Self::Ars => "ARS",
            Self::Brl => "BRL",
            Self::Clp => "CLP",
            Self::Eur => "EUR",
            Self::Eth => "ETH",
            Self::Xlm => "XLM",
            Self::Btc => "BTC",
        }
    }

    /// Returns true for fiat currencies
    pub fn is_fiat(&self) -> bool {
        matches!(self, Self::Ars | Self::Brl | Self::Clp | Self::Eur)
    }
}

impl WireEnum for Wallet {
    fn table() -> &'static WireTable<Self> {
        static TABLE: OnceLock<WireTable<Wallet>> = OnceLock::new();
        TABLE.get_or_init(|| WireTable::new("Wallet", Wallet::ALL, Wallet::wire))
    }

    fn as_str(&self) -> &'static str {
        self.wire()
    }
}

impl_wire_traits!(Wallet);
