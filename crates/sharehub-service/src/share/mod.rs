//! Share use cases built on top of the registry.

pub mod batch;

pub use batch::{
    BatchOperation, BatchShareRequest, BatchShareResult, BatchShareService, ShareFailure,
    ShareSuccess, ShareType,
};
