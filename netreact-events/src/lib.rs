//! Event engine for Netreact-RS
//!
//! Everything between a captured ARP observation and an alert on
//! disk: the exclusion filter, the 7-category event masks, the
//! classifier, the durable notification writer and the retention
//! janitor that expires old notification files.

pub mod cidr;
pub mod emitter;
pub mod event_type;
pub mod filter;
pub mod handler;
pub mod janitor;
pub mod mask;
pub mod notification;

pub use cidr::ExpectedCidr;
pub use emitter::NotificationStore;
pub use event_type::EventType;
pub use filter::ArpEventFilter;
pub use handler::ArpEventHandler;
pub use janitor::EventJanitor;
pub use mask::EventMask;
pub use notification::Notification;
