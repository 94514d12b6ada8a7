/// CSV export of analyzed series.
pub mod export;
