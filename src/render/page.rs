use std::fmt;
use crate::{Error, Result};
use super::view::{to_html, Node};

/// Containers a host page can expose for rendered content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRole {
    ProjectGrid,
    GamesGrid,
    UpdatesContainer,
}

impl ContainerRole {
    pub fn name(&self) -> &'static str {
        match self {
            ContainerRole::ProjectGrid => "project-grid",
            ContainerRole::GamesGrid => "games-grid",
            ContainerRole::UpdatesContainer => "updates-container",
        }
    }

    /// Placeholder comment the host page puts inside the container element.
    pub fn marker(&self) -> String {
        format!("<!-- folio:{} -->", self.name())
    }

    pub fn template_file(&self) -> &'static str {
        match self {
            ContainerRole::ProjectGrid => "projects.html",
            ContainerRole::GamesGrid => "games.html",
            ContainerRole::UpdatesContainer => "updates.html",
        }
    }
}

impl fmt::Display for ContainerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Replace the container marker in `template` with the rendered nodes.
pub fn mount(template: &str, role: ContainerRole, nodes: &[Node]) -> Result<String> {
    let marker = role.marker();
    if !template.contains(&marker) {
        return Err(Error::NotFound(format!("{} container in page template", role)));
    }
    Ok(template.replacen(&marker, &to_html(nodes), 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::cards::empty_message;

    #[test]
    fn replaces_the_role_marker() {
        let template = "<main><div class=\"games-grid\"><!-- folio:games-grid --></div></main>";
        let page = mount(template, ContainerRole::GamesGrid, &[empty_message("Nothing yet")]).unwrap();
        assert!(page.starts_with("<main><div class=\"games-grid\"><div class=\"empty-message\"><p>Nothing yet</p>"));
        assert!(!page.contains("folio:"));
    }

    #[test]
    fn missing_container_is_not_found() {
        let err = mount("<main></main>", ContainerRole::ProjectGrid, &[]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn roles_map_to_templates() {
        assert_eq!(ContainerRole::UpdatesContainer.marker(), "<!-- folio:updates-container -->");
        assert_eq!(ContainerRole::ProjectGrid.template_file(), "projects.html");
    }
}
