pub mod headhunter;
pub mod report;
pub mod salary;
pub mod stats;
pub mod superjob;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request error: '{0}'")]
    Request(#[from] reqwest::Error),
    #[error("Request not successful for: '{0}'")]
    RequestNotOk(String),
}
