pub mod view;
pub mod cards;
pub mod page;

pub use view::{to_html, Element, Node};
pub use cards::{render_games, render_projects, render_updates};
pub use page::{mount, ContainerRole};
