pub mod impression;
pub mod request;
pub mod syllable;
