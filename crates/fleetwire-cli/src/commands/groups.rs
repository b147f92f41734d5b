//! `fleetwire groups` — describe auto scaling groups.

use std::collections::HashMap;

use fleetwire_asg::{AutoScalingGroups, GroupDetail};

pub async fn describe(
    client: &impl AutoScalingGroups,
    names: &[String],
    format: &str,
) -> anyhow::Result<()> {
    let groups = client.describe_groups(names).await?;

    match format {
        "json" => println!("{}", format_json(&groups)?),
        _ => print!("{}", format_text(&groups)),
    }

    Ok(())
}

/// Groups sorted by name for stable output.
fn sorted(groups: &HashMap<String, GroupDetail>) -> Vec<&GroupDetail> {
    let mut rows: Vec<&GroupDetail> = groups.values().collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

fn format_json(groups: &HashMap<String, GroupDetail>) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&sorted(groups))?)
}

fn format_text(groups: &HashMap<String, GroupDetail>) -> String {
    if groups.is_empty() {
        return "No auto scaling groups found.\n".to_string();
    }

    let mut out = String::new();
    for group in sorted(groups) {
        out.push_str(&format!(
            "{}  min={} max={} desired={} instances={}\n",
            group.name,
            group.min_size,
            group.max_size,
            group.desired_capacity,
            group.instances.len()
        ));
        if let Some(status) = &group.status {
            out.push_str(&format!("  status: {status}\n"));
        }
        for lb in &group.load_balancer_names {
            out.push_str(&format!("  lb: {lb}\n"));
        }
        for tg in &group.target_group_arns {
            out.push_str(&format!("  tg: {tg}\n"));
        }
        for instance in &group.instances {
            out.push_str(&format!(
                "  {}  {}  {}  {}\n",
                instance.id,
                instance.availability_zone,
                instance.lifecycle_state,
                instance.health_status
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetwire_asg::GroupInstance;

    fn test_group(name: &str) -> GroupDetail {
        GroupDetail {
            name: name.to_string(),
            min_size: 1,
            max_size: 6,
            desired_capacity: 3,
            status: None,
            availability_zones: vec!["us-east-1a".to_string()],
            load_balancer_names: vec!["web-elb".to_string()],
            target_group_arns: vec![],
            instances: vec![GroupInstance {
                id: "i-0abc".to_string(),
                availability_zone: "us-east-1a".to_string(),
                lifecycle_state: "InService".to_string(),
                health_status: "Healthy".to_string(),
            }],
        }
    }

    fn index(groups: Vec<GroupDetail>) -> HashMap<String, GroupDetail> {
        groups.into_iter().map(|g| (g.name.clone(), g)).collect()
    }

    #[test]
    fn text_output_lists_groups_sorted_by_name() {
        let groups = index(vec![test_group("web"), test_group("api")]);
        let text = format_text(&groups);

        let api_pos = text.find("api ").unwrap();
        let web_pos = text.find("web ").unwrap();
        assert!(api_pos < web_pos);
        assert!(text.contains("min=1 max=6 desired=3 instances=1"));
        assert!(text.contains("lb: web-elb"));
        assert!(text.contains("i-0abc"));
    }

    #[test]
    fn text_output_for_empty_result() {
        let text = format_text(&HashMap::new());
        assert_eq!(text, "No auto scaling groups found.\n");
    }

    #[test]
    fn json_output_is_a_sorted_array() {
        let groups = index(vec![test_group("web"), test_group("api")]);
        let json = format_json(&groups).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["name"], "api");
        assert_eq!(array[1]["name"], "web");
        assert_eq!(array[1]["desired_capacity"], 3);
    }
}
