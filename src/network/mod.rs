pub mod network;
pub mod record;

pub use network::Network;
pub use record::LayerRecord;
