pub mod apollo;
pub mod notifications;
pub mod prospecting;
pub mod scoring;
pub mod sources;
