pub mod abugames;
pub mod cardkingdom;
pub mod channelfireball;
pub mod fetch;
pub mod jupitergames;

pub use abugames::AbuGames;
pub use cardkingdom::CardKingdom;
pub use channelfireball::ChannelFireball;
pub use jupitergames::JupiterGames;
