use anyhow::Result;

use crate::domain::StatusLine;

use super::super::Container;

pub struct RemoveController<'a> {
    container: &'a Container,
}

impl<'a> RemoveController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn remove(&self, uuid: String) -> Result<String> {
        let use_case = self.container.remove_use_case();
        let result = use_case.execute(&uuid).await;
        let status = StatusLine::for_remove(&result);

        match result {
            Ok(_) => Ok(self.format_remove_accepted(&status)),
            Err(e) => Err(anyhow::Error::new(e).context(status.to_string())),
        }
    }

    fn format_remove_accepted(&self, status: &StatusLine) -> String {
        format!(
            "{}\nThe repository stops being listed once the backend has processed the removal.",
            status
        )
    }
}
