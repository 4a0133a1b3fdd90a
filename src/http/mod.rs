mod client;
pub mod error;
pub mod method;
pub mod request;
pub mod response;

pub use error::RequestError;
pub use method::HttpMethod;
pub use request::Request;
pub use response::{ApiResponse, ResponseBody};
