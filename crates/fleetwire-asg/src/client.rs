//! The Auto Scaling group client.
//!
//! [`AutoScalingGroups`] is the seam callers program against;
//! [`AwsAutoScaling`] is the implementation backed by the AWS SDK. Every
//! remote call goes through the throttle-retry discipline in [`crate::retry`]
//! and surfaces failures as [`AsgError`] with the provider's code and
//! message preserved.

use std::collections::HashMap;

use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_autoscaling::types::{
    AutoScalingGroup, Instance, LoadBalancerState, LoadBalancerTargetGroupState,
};
use aws_sdk_autoscaling::Client;
use tracing::debug;

use crate::error::{AsgError, AsgResult};
use crate::retry::{with_throttle_retry, RetryPolicy};
use crate::types::{
    AttachmentState, GroupDetail, GroupInstance, LoadBalancerAttachment, TargetGroupAttachment,
};

/// The Auto Scaling operations fleetwire relies on.
#[allow(async_fn_in_trait)]
pub trait AutoScalingGroups {
    /// Describe the named groups, indexed by group name.
    ///
    /// An empty `names` slice describes every group in the account, matching
    /// the provider's own semantics.
    async fn describe_groups(&self, names: &[String]) -> AsgResult<HashMap<String, GroupDetail>>;

    /// Classic load balancer attachment state for one group, indexed by
    /// load balancer name.
    async fn describe_load_balancer_state(
        &self,
        group: &str,
    ) -> AsgResult<HashMap<String, LoadBalancerAttachment>>;

    /// Attach classic load balancers to a group.
    async fn attach_load_balancers(&self, group: &str, names: &[String]) -> AsgResult<()>;

    /// Detach classic load balancers from a group.
    async fn detach_load_balancers(&self, group: &str, names: &[String]) -> AsgResult<()>;

    /// Attach target groups to a group.
    async fn attach_target_groups(&self, group: &str, target_group_arns: &[String])
        -> AsgResult<()>;

    /// Detach target groups from a group.
    async fn detach_target_groups(&self, group: &str, target_group_arns: &[String])
        -> AsgResult<()>;

    /// Target group attachment state for one group.
    async fn describe_target_group_state(
        &self,
        group: &str,
    ) -> AsgResult<Vec<TargetGroupAttachment>>;
}

/// SDK-backed [`AutoScalingGroups`] implementation.
pub struct AwsAutoScaling {
    client: Client,
    retry: RetryPolicy,
}

impl AwsAutoScaling {
    /// Wrap an existing SDK client.
    pub fn new(client: Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Build a client from the ambient AWS environment (credentials chain,
    /// region, shared config).
    ///
    /// The SDK's own retry layer is disabled: this adapter owns retry
    /// behavior, and stacking the two would multiply attempts.
    pub async fn from_env(retry: RetryPolicy) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .retry_config(RetryConfig::disabled())
            .load()
            .await;
        Self::new(Client::new(&config), retry)
    }
}

impl AutoScalingGroups for AwsAutoScaling {
    async fn describe_groups(&self, names: &[String]) -> AsgResult<HashMap<String, GroupDetail>> {
        const OP: &str = "describe-auto-scaling-groups";

        let groups = with_throttle_retry(&self.retry, OP, || {
            let mut stream = self
                .client
                .describe_auto_scaling_groups()
                .set_auto_scaling_group_names(if names.is_empty() {
                    None
                } else {
                    Some(names.to_vec())
                })
                .into_paginator()
                .items()
                .send();
            async move {
                let mut groups = Vec::new();
                while let Some(item) = stream.next().await {
                    groups.push(item?);
                }
                Ok(groups)
            }
        })
        .await
        .map_err(|e| AsgError::from_sdk(OP, e))?;

        debug!(requested = names.len(), returned = groups.len(), "described auto scaling groups");

        Ok(index_groups(groups.iter().filter_map(group_detail)))
    }

    async fn describe_load_balancer_state(
        &self,
        group: &str,
    ) -> AsgResult<HashMap<String, LoadBalancerAttachment>> {
        const OP: &str = "describe-load-balancers";

        let states = with_throttle_retry(&self.retry, OP, || {
            let mut stream = self
                .client
                .describe_load_balancers()
                .auto_scaling_group_name(group)
                .into_paginator()
                .send();
            async move {
                let mut states = Vec::new();
                while let Some(page) = stream.next().await {
                    states.extend(page?.load_balancers.unwrap_or_default());
                }
                Ok(states)
            }
        })
        .await
        .map_err(|e| AsgError::from_sdk(OP, e))?;

        debug!(group, count = states.len(), "described load balancer state");

        Ok(states
            .iter()
            .filter_map(lb_attachment)
            .map(|lb| (lb.name.clone(), lb))
            .collect())
    }

    async fn attach_load_balancers(&self, group: &str, names: &[String]) -> AsgResult<()> {
        const OP: &str = "attach-load-balancers";

        with_throttle_retry(&self.retry, OP, || {
            let req = self
                .client
                .attach_load_balancers()
                .auto_scaling_group_name(group)
                .set_load_balancer_names(Some(names.to_vec()));
            async move { req.send().await }
        })
        .await
        .map_err(|e| AsgError::from_sdk(OP, e))?;

        debug!(group, count = names.len(), "attached load balancers");
        Ok(())
    }

    async fn detach_load_balancers(&self, group: &str, names: &[String]) -> AsgResult<()> {
        const OP: &str = "detach-load-balancers";

        with_throttle_retry(&self.retry, OP, || {
            let req = self
                .client
                .detach_load_balancers()
                .auto_scaling_group_name(group)
                .set_load_balancer_names(Some(names.to_vec()));
            async move { req.send().await }
        })
        .await
        .map_err(|e| AsgError::from_sdk(OP, e))?;

        debug!(group, count = names.len(), "detached load balancers");
        Ok(())
    }

    async fn attach_target_groups(
        &self,
        group: &str,
        target_group_arns: &[String],
    ) -> AsgResult<()> {
        const OP: &str = "attach-load-balancer-target-groups";

        with_throttle_retry(&self.retry, OP, || {
            let req = self
                .client
                .attach_load_balancer_target_groups()
                .auto_scaling_group_name(group)
                .set_target_group_arns(Some(target_group_arns.to_vec()));
            async move { req.send().await }
        })
        .await
        .map_err(|e| AsgError::from_sdk(OP, e))?;

        debug!(group, count = target_group_arns.len(), "attached target groups");
        Ok(())
    }

    async fn detach_target_groups(
        &self,
        group: &str,
        target_group_arns: &[String],
    ) -> AsgResult<()> {
        const OP: &str = "detach-load-balancer-target-groups";

        with_throttle_retry(&self.retry, OP, || {
            let req = self
                .client
                .detach_load_balancer_target_groups()
                .auto_scaling_group_name(group)
                .set_target_group_arns(Some(target_group_arns.to_vec()));
            async move { req.send().await }
        })
        .await
        .map_err(|e| AsgError::from_sdk(OP, e))?;

        debug!(group, count = target_group_arns.len(), "detached target groups");
        Ok(())
    }

    async fn describe_target_group_state(
        &self,
        group: &str,
    ) -> AsgResult<Vec<TargetGroupAttachment>> {
        const OP: &str = "describe-load-balancer-target-groups";

        let states = with_throttle_retry(&self.retry, OP, || {
            let mut stream = self
                .client
                .describe_load_balancer_target_groups()
                .auto_scaling_group_name(group)
                .into_paginator()
                .send();
            async move {
                let mut states = Vec::new();
                while let Some(page) = stream.next().await {
                    states.extend(page?.load_balancer_target_groups.unwrap_or_default());
                }
                Ok(states)
            }
        })
        .await
        .map_err(|e| AsgError::from_sdk(OP, e))?;

        debug!(group, count = states.len(), "described target group state");

        Ok(states.iter().filter_map(tg_attachment).collect())
    }
}

// ── Wire-to-view conversions ───────────────────────────────────────
//
// Records without a name/ARN are skipped: the provider never emits them in
// practice, and an unnamed entry is unusable to callers keyed by name.

fn index_groups(groups: impl Iterator<Item = GroupDetail>) -> HashMap<String, GroupDetail> {
    groups.map(|g| (g.name.clone(), g)).collect()
}

fn group_detail(group: &AutoScalingGroup) -> Option<GroupDetail> {
    let name = group.auto_scaling_group_name()?.to_string();
    Some(GroupDetail {
        name,
        min_size: group.min_size().unwrap_or_default(),
        max_size: group.max_size().unwrap_or_default(),
        desired_capacity: group.desired_capacity().unwrap_or_default(),
        status: group.status().map(str::to_owned),
        availability_zones: group.availability_zones().to_vec(),
        load_balancer_names: group.load_balancer_names().to_vec(),
        target_group_arns: group.target_group_arns().to_vec(),
        instances: group.instances().iter().map(group_instance).collect(),
    })
}

fn group_instance(instance: &Instance) -> GroupInstance {
    GroupInstance {
        id: instance.instance_id().unwrap_or_default().to_string(),
        availability_zone: instance.availability_zone().unwrap_or_default().to_string(),
        lifecycle_state: instance
            .lifecycle_state()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        health_status: instance.health_status().unwrap_or_default().to_string(),
    }
}

fn lb_attachment(state: &LoadBalancerState) -> Option<LoadBalancerAttachment> {
    Some(LoadBalancerAttachment {
        name: state.load_balancer_name()?.to_string(),
        state: AttachmentState::parse(state.state().unwrap_or_default()),
    })
}

fn tg_attachment(state: &LoadBalancerTargetGroupState) -> Option<TargetGroupAttachment> {
    Some(TargetGroupAttachment {
        arn: state.load_balancer_target_group_arn()?.to_string(),
        state: AttachmentState::parse(state.state().unwrap_or_default()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lb_attachment_converts_name_and_state() {
        let state = LoadBalancerState::builder()
            .load_balancer_name("web-elb")
            .state("Added")
            .build();

        let attachment = lb_attachment(&state).unwrap();
        assert_eq!(attachment.name, "web-elb");
        assert_eq!(attachment.state, AttachmentState::Added);
    }

    #[test]
    fn lb_attachment_without_name_is_skipped() {
        let state = LoadBalancerState::builder().state("Added").build();
        assert!(lb_attachment(&state).is_none());
    }

    #[test]
    fn lb_attachment_missing_state_is_unknown() {
        let state = LoadBalancerState::builder()
            .load_balancer_name("web-elb")
            .build();

        let attachment = lb_attachment(&state).unwrap();
        assert_eq!(attachment.state, AttachmentState::Unknown(String::new()));
    }

    #[test]
    fn tg_attachment_converts_arn_and_state() {
        let state = LoadBalancerTargetGroupState::builder()
            .load_balancer_target_group_arn(
                "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/web/abc",
            )
            .state("InService")
            .build();

        let attachment = tg_attachment(&state).unwrap();
        assert!(attachment.arn.ends_with("targetgroup/web/abc"));
        assert!(attachment.state.is_in_service());
    }

    #[test]
    fn tg_attachment_without_arn_is_skipped() {
        let state = LoadBalancerTargetGroupState::builder()
            .state("InService")
            .build();
        assert!(tg_attachment(&state).is_none());
    }

    #[test]
    fn index_groups_keys_by_name() {
        let groups = vec![
            GroupDetail {
                name: "web".to_string(),
                min_size: 1,
                max_size: 4,
                desired_capacity: 2,
                status: None,
                availability_zones: vec!["us-east-1a".to_string()],
                load_balancer_names: vec![],
                target_group_arns: vec![],
                instances: vec![],
            },
            GroupDetail {
                name: "worker".to_string(),
                min_size: 0,
                max_size: 2,
                desired_capacity: 1,
                status: None,
                availability_zones: vec!["us-east-1b".to_string()],
                load_balancer_names: vec![],
                target_group_arns: vec![],
                instances: vec![],
            },
        ];

        let map = index_groups(groups.into_iter());
        assert_eq!(map.len(), 2);
        assert_eq!(map["web"].desired_capacity, 2);
        assert_eq!(map["worker"].max_size, 2);
    }
}
