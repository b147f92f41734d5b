//! `fleetwire lb` — classic load balancer attachments.

use std::collections::HashMap;

use fleetwire_asg::{AutoScalingGroups, LoadBalancerAttachment};

pub async fn state(
    client: &impl AutoScalingGroups,
    group: &str,
    format: &str,
) -> anyhow::Result<()> {
    let attachments = client.describe_load_balancer_state(group).await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&sorted(&attachments))?),
        _ => print!("{}", format_text(&attachments)),
    }

    Ok(())
}

pub async fn attach(
    client: &impl AutoScalingGroups,
    group: &str,
    names: &[String],
) -> anyhow::Result<()> {
    client.attach_load_balancers(group, names).await?;
    println!("✓ Attached {} load balancer(s) to {group}", names.len());
    Ok(())
}

pub async fn detach(
    client: &impl AutoScalingGroups,
    group: &str,
    names: &[String],
) -> anyhow::Result<()> {
    client.detach_load_balancers(group, names).await?;
    println!("✓ Detached {} load balancer(s) from {group}", names.len());
    Ok(())
}

fn sorted(attachments: &HashMap<String, LoadBalancerAttachment>) -> Vec<&LoadBalancerAttachment> {
    let mut rows: Vec<&LoadBalancerAttachment> = attachments.values().collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

fn format_text(attachments: &HashMap<String, LoadBalancerAttachment>) -> String {
    if attachments.is_empty() {
        return "No load balancers attached.\n".to_string();
    }

    let mut out = String::new();
    for attachment in sorted(attachments) {
        out.push_str(&format!("{}  {}\n", attachment.name, attachment.state));
    }
    out
}
