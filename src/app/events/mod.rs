//! Intent-, Command- und Event-Typen für den Datenfluss UI → Hub → Beobachter.

mod bus;
mod command;
mod intent;

pub use bus::{EventBus, HubEvent, SubscriptionId};
pub use command::{CameraDelta, HubCommand};
pub use intent::{OrbitKey, ViewerIntent};
