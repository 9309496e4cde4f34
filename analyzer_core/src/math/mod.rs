pub mod boll;
pub mod max_profit;
pub mod returns;
pub mod rsi;
pub mod runs;
pub mod sma;
