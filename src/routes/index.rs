use askama::Template;

use crate::error::InternalError;

pub const SOCKET_PATH: &str = "/ws";

#[derive(Template)]
#[template(path = "index.html", escape = "none")]
struct IndexTemplate {
    content: String,
    socket_path: &'static str,
}

pub fn render_main(content: String) -> Result<String, InternalError> {
    Ok(IndexTemplate {
        content,
        socket_path: SOCKET_PATH,
    }
    .render()?)
}
