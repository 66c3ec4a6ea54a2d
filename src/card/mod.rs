pub(crate) mod request;
pub mod store;
