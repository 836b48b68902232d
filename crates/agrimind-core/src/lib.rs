pub mod consts;
pub mod error;
pub mod series;
pub mod trend;
pub mod forecast;
pub mod vegetation;
pub mod detection;
pub mod recommend;
pub mod io;
pub mod pipeline;
