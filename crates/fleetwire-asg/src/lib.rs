//! fleetwire-asg — narrow adapter over the AWS EC2 Auto Scaling API.
//!
//! Exposes the handful of operations fleetwire needs to wire auto scaling
//! groups to classic load balancers and ALB/NLB target groups: describe
//! groups, attach/detach load balancers, attach/detach target groups, and
//! read attachment state.
//!
//! # Architecture
//!
//! Every remote call goes through a single retry discipline
//! ([`retry::with_throttle_retry`]): throttle responses are retried with
//! bounded exponential backoff, everything else propagates to the caller on
//! the first occurrence. The SDK's built-in retry layer is disabled when the
//! config is loaded through [`client::AwsAutoScaling::from_env`] so attempt
//! counts mean what they say.
//!
//! Callers see narrow serializable views ([`types`]) rather than the
//! provider's wire shapes; optional-by-wire fields are resolved at the
//! adapter boundary.

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::{AutoScalingGroups, AwsAutoScaling};
pub use error::{AsgError, AsgResult};
pub use retry::{MaybeThrottled, RetryError, RetryPolicy};
pub use types::*;
