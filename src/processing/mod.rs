pub mod boxplot;
pub mod histogram;
pub mod statistics;
