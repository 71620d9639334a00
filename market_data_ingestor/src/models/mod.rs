pub mod bar;
pub mod lookback;
pub mod request_params;
pub mod timeframe;
