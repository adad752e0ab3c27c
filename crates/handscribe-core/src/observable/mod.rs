#[allow(clippy::module_inception)]
mod observable;
mod subscription;

pub(crate) use subscription::Subscribers;

pub use {observable::Observable, subscription::Subscription};
