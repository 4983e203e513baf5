/*
[INPUT]:  Backpack REST schema (camelCase JSON, decimal strings)
[OUTPUT]: Enums, request payloads, market models and account/order responses
[POS]:    Data layer - wire types shared by the HTTP and CLI layers
[UPDATE]: When a resource group gains new request or response shapes
*/

pub mod enums;
pub mod models;
pub mod requests;
pub mod responses;

pub use enums::*;
pub use models::*;
pub use requests::*;
pub use responses::*;
