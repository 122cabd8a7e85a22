use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::{format_bytes, RepoView};
use crate::SortOrder;

use super::super::Container;

pub struct ListController<'a> {
    container: &'a Container,
}

impl<'a> ListController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self, format: OutputFormat, order: SortOrder) -> Result<String> {
        let use_case = self.container.list_use_case();
        let views = use_case.execute(order).await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&views)?,
            OutputFormat::Text => self.format_repository_list(&views),
        })
    }

    fn format_repository_list(&self, views: &[RepoView]) -> String {
        if views.is_empty() {
            return "No repositories tracked.".to_string();
        }

        let mut output = "Tracked repositories:\n\n".to_string();
        for view in views {
            output.push_str(&format!("  {}\n", view.label()));
            output.push_str(&format!("    Id:       {}\n", view.id));
            output.push_str(&format!("    Root:     {}\n", view.root));
            if view.total_bytes() == 0 {
                output.push_str(&format!("    Progress: {}\n", view.completion));
            } else {
                output.push_str(&format!(
                    "    Progress: {} ({} of {} saved, {} pending)\n",
                    view.completion,
                    format_bytes(view.done_bytes),
                    format_bytes(view.total_bytes()),
                    format_bytes(view.missing_bytes)
                ));
            }
            output.push_str(&format!(
                "    Files:    {}/{} complete\n",
                view.files_complete, view.files_total
            ));
            output.push('\n');
        }

        output
    }
}
