//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::envelope::Resource;
use crate::models::{
    AppAttributes, BetaGroupAttributes, BetaTesterAttributes, BuildAttributes, DeviceAttributes,
    ReviewAttributes,
};

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(kind: &str, id: &str) -> Vec<String> {
    let title = format!("{kind}: {id}");
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for Resource<AppAttributes> {
    fn pretty_print(&self) -> String {
        let mut lines = header("App", &self.id);
        lines.push(format!("Name:           {}", self.attributes.name));
        lines.push(format!("Bundle ID:      {}", self.attributes.bundle_id));
        lines.push(format!("SKU:            {}", self.attributes.sku));
        if let Some(ref locale) = self.attributes.primary_locale {
            lines.push(format!("Locale:         {}", locale));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Resource<BuildAttributes> {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Build", &self.id);
        lines.push(format!("Version:        {}", attrs.version));
        if let Some(ref state) = attrs.processing_state {
            lines.push(format!("State:          {}", state));
        }
        if let Some(ref uploaded) = attrs.uploaded_date {
            lines.push(format!(
                "Uploaded:       {}",
                uploaded.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }
        if attrs.expired {
            lines.push("Expired:        yes".to_string());
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Resource<BetaGroupAttributes> {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Beta Group", &self.id);
        lines.push(format!("Name:           {}", attrs.name));
        lines.push(format!(
            "Internal:       {}",
            if attrs.is_internal_group { "yes" } else { "no" }
        ));
        if let Some(ref link) = attrs.public_link {
            lines.push(format!("Public Link:    {}", link));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Resource<BetaTesterAttributes> {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Beta Tester", &self.id);
        lines.push(format!("Name:           {}", attrs.display_name()));
        if let Some(ref email) = attrs.email {
            lines.push(format!("Email:          {}", email));
        }
        lines.push(format!("State:          {:?}", attrs.state));
        lines.join("\n")
    }
}

impl PrettyPrint for Resource<ReviewAttributes> {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Review", &self.id);
        lines.push(format!(
            "Rating:         {}",
            "★".repeat(usize::from(attrs.rating.min(5)))
        ));
        lines.push(format!("Title:          {}", attrs.title));
        lines.push(format!("Reviewer:       {}", attrs.reviewer_nickname));
        lines.push(format!("Territory:      {}", attrs.territory));
        lines.push(String::new());
        lines.push(attrs.body.clone());
        lines.join("\n")
    }
}

impl PrettyPrint for Resource<DeviceAttributes> {
    fn pretty_print(&self) -> String {
        let attrs = &self.attributes;
        let mut lines = header("Device", &self.id);
        lines.push(format!("Name:           {}", attrs.name));
        lines.push(format!("UDID:           {}", attrs.udid));
        lines.push(format!("Platform:       {}", attrs.platform.as_str()));
        lines.push(format!("Status:         {}", attrs.status));
        lines.join("\n")
    }
}
