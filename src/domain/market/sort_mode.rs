use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Orderings fulfilled by the API through the `order` request parameter.
/// Switching to one of these requires a fresh paginated fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerOrder {
    MarketCapDesc,
    MarketCapAsc,
    VolumeDesc,
    VolumeAsc,
}

/// Orderings computed locally over records that were already fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientOrder {
    PriceDesc,
    PriceAsc,
    Change24hDesc,
    Change24hAsc,
}

/// Sort selection offered by the coin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    Server(ServerOrder),
    Client(ClientOrder),
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::Server(ServerOrder::MarketCapDesc)
    }
}

impl ServerOrder {
    /// Value of the CoinGecko `order` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerOrder::MarketCapDesc => "market_cap_desc",
            ServerOrder::MarketCapAsc => "market_cap_asc",
            ServerOrder::VolumeDesc => "volume_desc",
            ServerOrder::VolumeAsc => "volume_asc",
        }
    }
}

impl ClientOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientOrder::PriceDesc => "current_price_desc",
            ClientOrder::PriceAsc => "current_price_asc",
            ClientOrder::Change24hDesc => "price_change_percentage_24h_desc",
            ClientOrder::Change24hAsc => "price_change_percentage_24h_asc",
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, ClientOrder::PriceDesc | ClientOrder::Change24hDesc)
    }
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Server(order) => order.as_str(),
            SortMode::Client(order) => order.as_str(),
        }
    }

    pub fn is_server_ordered(&self) -> bool {
        matches!(self, SortMode::Server(_))
    }

    /// Human readable label for the sort selector
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Server(ServerOrder::MarketCapDesc) => "Market Cap Desc",
            SortMode::Server(ServerOrder::MarketCapAsc) => "Market Cap Asc",
            SortMode::Server(ServerOrder::VolumeDesc) => "Volume Desc",
            SortMode::Server(ServerOrder::VolumeAsc) => "Volume Asc",
            SortMode::Client(ClientOrder::PriceDesc) => "Price Desc (Client)",
            SortMode::Client(ClientOrder::PriceAsc) => "Price Asc (Client)",
            SortMode::Client(ClientOrder::Change24hDesc) => "24h Change Desc (Client)",
            SortMode::Client(ClientOrder::Change24hAsc) => "24h Change Asc (Client)",
        }
    }

    /// Returns all sort modes in selector order, server-ordered first
    pub fn all() -> Vec<SortMode> {
        vec![
            SortMode::Server(ServerOrder::MarketCapDesc),
            SortMode::Server(ServerOrder::MarketCapAsc),
            SortMode::Server(ServerOrder::VolumeDesc),
            SortMode::Server(ServerOrder::VolumeAsc),
            SortMode::Client(ClientOrder::PriceDesc),
            SortMode::Client(ClientOrder::PriceAsc),
            SortMode::Client(ClientOrder::Change24hDesc),
            SortMode::Client(ClientOrder::Change24hAsc),
        ]
    }
}

impl FromStr for SortMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        SortMode::all()
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| {
                anyhow!(
                    "Invalid sort mode: '{}'. Valid options: {}",
                    s,
                    SortMode::all()
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
