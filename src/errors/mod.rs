pub mod domain;

pub use domain::{DomainError, InfraErrorKind, NotFoundKind};
