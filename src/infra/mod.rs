pub mod http_client;
pub mod image_text;
pub mod post_source;

pub use http_client::ReqwestSinkClient;
pub use image_text::HttpImageText;
pub use post_source::JsonSnapshotSource;
