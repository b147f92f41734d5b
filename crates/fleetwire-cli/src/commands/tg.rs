//! `fleetwire tg` — target group attachments.

use fleetwire_asg::{AutoScalingGroups, TargetGroupAttachment};

pub async fn state(
    client: &impl AutoScalingGroups,
    group: &str,
    format: &str,
) -> anyhow::Result<()> {
    let mut attachments = client.describe_target_group_state(group).await?;
    attachments.sort_by(|a, b| a.arn.cmp(&b.arn));

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&attachments)?),
        _ => print!("{}", format_text(&attachments)),
    }

    Ok(())
}

pub async fn attach(
    client: &impl AutoScalingGroups,
    group: &str,
    arns: &[String],
) -> anyhow::Result<()> {
    client.attach_target_groups(group, arns).await?;
    println!("✓ Attached {} target group(s) to {group}", arns.len());
    Ok(())
}

pub async fn detach(
    client: &impl AutoScalingGroups,
    group: &str,
    arns: &[String],
) -> anyhow::Result<()> {
    client.detach_target_groups(group, arns).await?;
    println!("✓ Detached {} target group(s) from {group}", arns.len());
    Ok(())
}

fn format_text(attachments: &[TargetGroupAttachment]) -> String {
    if attachments.is_empty() {
        return "No target groups attached.\n".to_string();
    }

    let mut out = String::new();
    for attachment in attachments {
        out.push_str(&format!("{}  {}\n", attachment.arn, attachment.state));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwire_asg::AttachmentState;

    #[test]
    fn text_output_lists_arn_and_state() {
        let attachments = vec![TargetGroupAttachment {
            arn: "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/web/abc"
                .to_string(),
            state: AttachmentState::Added,
        }];

        let text = format_text(&attachments);
        assert!(text.contains("targetgroup/web/abc"));
        assert!(text.contains("Added"));
    }

    #[test]
    fn text_output_for_no_attachments() {
        assert_eq!(format_text(&[]), "No target groups attached.\n");
    }
}
