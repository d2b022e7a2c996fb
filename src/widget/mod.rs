use std::fmt::Debug;

use include_dir::{include_dir, Dir, File};
use lazy_static::*;
use serde::Serialize;
use tera::Tera;

pub use leaderboard::*;
pub use match_history::*;
pub use match_info::*;
pub use telemetry::*;
pub use tip_card::*;

mod formatters;
mod leaderboard;
mod match_history;
mod match_info;
mod telemetry;
mod tip_card;

pub trait Widget
where
    Self: Serialize + Sized + Debug,
{
    /// Must be a file name ending in `.j2`, located in `src/res/widgets/`.
    const FILE: &'static str;

    /// The region of the broadcast page that this widget is displayed in.
    /// Matches the ID of the container element on that page.
    const REGION: &'static str;

    /// Render the template file with this context, extended by
    /// - `region`: the container ID
    fn render(&self) -> tera::Result<String> {
        log::debug!("render widget context: {:?}", &self);

        let mut tera_context = tera::Context::from_serialize(self)?;
        Self::extend_ctxt(&mut tera_context);
        TEMPLATES.render(Self::FILE, &tera_context)
    }

    /// Render an empty widget that replaces a previously displayed widget
    /// of this type.
    fn hidden() -> tera::Result<String> {
        let mut tera_context = tera::Context::new();
        Self::extend_ctxt(&mut tera_context);
        TEMPLATES.render("empty.j2", &tera_context)
    }

    fn extend_ctxt(ctxt: &mut tera::Context) {
        ctxt.insert("region", Self::REGION);
    }
}

lazy_static! {
    static ref TEMPLATES: Tera = collect_templates().expect("failed to collect widget templates");
}

fn collect_templates() -> tera::Result<Tera> {
    // Include all widget templates at compile-time:
    static TEMPLATE_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/res/widgets");

    let mut tera = Tera::default();

    // Competitor names and descriptions are written by bot developers.
    tera.autoescape_on(vec![".j2"]);

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
