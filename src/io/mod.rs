/// CSV loading of the raw hourly input series.
pub mod load;
