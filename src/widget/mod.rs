use std::fmt::Debug;

use include_dir::{include_dir, Dir, File};
use lazy_static::*;
use serde::Serialize;
use tera::Tera;

pub use countdown::*;
pub use header::*;
pub use prayer_list::*;
pub use status::*;
pub use style::*;

mod countdown;
mod header;
mod prayer_list;
mod ser;
mod status;
mod style;

pub trait Widget
where
    Self: Serialize + Sized + Debug,
{
    /// Must be a file name ending in `.j2`, located in `src/res/widgets/`.
    const FILE: &'static str;

    /// Element ID for this widget. Defaults to its file name.
    ///
    /// Choosing the same ID for multiple widgets allows replacing
    /// one widget with another.
    const ID: &'static str = Self::FILE;

    /// Render the template file with this context, extended by
    /// - `widget_id`: use as the root element's ID
    fn render(&self) -> String {
        log::trace!("render widget context: {:?}", &self);

        let mut tera_context =
            tera::Context::from_serialize(self).expect("failed to create widget context!");
        Self::extend_ctxt(&mut tera_context);

        TEMPLATES
            .render(Self::FILE, &tera_context)
            .expect("failed to render widget!")
    }

    /// Render an empty widget that can replace a previously rendered widget
    /// of this type.
    fn hidden() -> String {
        let mut tera_context = tera::Context::new();
        Self::extend_ctxt(&mut tera_context);
        TEMPLATES
            .render("empty.j2", &tera_context)
            .expect("failed to render widget!")
    }

    fn extend_ctxt(ctxt: &mut tera::Context) {
        ctxt.insert("widget_id", widget_id(Self::ID));
    }
}

/// Strip the template extension, so that `countdown.j2` becomes `countdown`.
pub fn widget_id(id: &str) -> &str {
    id.trim_end_matches(".j2")
}

lazy_static! {
    static ref TEMPLATES: Tera = collect_templates().expect("failed to collect widget templates");
}

fn collect_templates() -> tera::Result<Tera> {
    // Include all widget templates at compile-time:
    static TEMPLATE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/res/widgets");

    let mut tera = Tera::default();

    let add_from_file = |tera: &mut Tera, file: &File| {
        let file_name = file.path().to_str().expect("failed to read template");
        tera.add_raw_template(
            file_name,
            file.contents_utf8().expect("failed to read template"),
        )
    };

    for file in TEMPLATE_DIR.files() {
        add_from_file(&mut tera, file)?;
    }

    Ok(tera)
}
