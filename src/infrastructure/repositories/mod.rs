pub mod http_synthesis_repository;
pub mod synthesis_repository;

pub use http_synthesis_repository::HttpRemoteSynthesizer;
pub use synthesis_repository::RemoteSynthesizer;
