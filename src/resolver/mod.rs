pub mod dependency_resolver;

pub use dependency_resolver::DependencyResolver;
