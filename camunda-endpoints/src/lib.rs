#![forbid(unsafe_code)]

//! Camunda REST endpoints, grouped by resource.
//!
//! ```rust,ignore
//! let camunda = Camunda::new("http://localhost:8080", None)?;
//! let deployments = GetDeployments::new()
//!     .with_parameters(json!({ "nameLike": "invoice%", "sortBy": "name", "sortOrder": "asc" }))?;
//! for d in camunda.dispatch(&deployments, None, false).await?.unwrap().iter() {
//!     println!("{:?} deployed at {}", d.name, d.deployment_time);
//! }
//! ```

macro_rules! delegate_base {
    ($method:ty) => {
        fn base(&self) -> &::camunda_core::EndpointBase<$method> {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ::camunda_core::EndpointBase<$method> {
            &mut self.base
        }
    };
}

pub mod authorization;
pub mod common;
pub mod deployment;

pub use crate::common::{ContentType, Count, Link, ResourceType, SortOrder, UnknownId, WireEnum};
