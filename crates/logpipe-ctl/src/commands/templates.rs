//! `logpipe-ctl templates`

use logpipe_render::{RenderConfig, TemplateSource};

use crate::output;

pub(crate) fn handle_templates_command(config: &RenderConfig) {
    let source = config.template_source();
    let types = source.plugin_types();

    if types.is_empty() {
        output::warning("No plugin templates found.");
        return;
    }

    output::header("Available plugin types:");
    for plugin_type in &types {
        let origin = config
            .template_dirs
            .iter()
            .map(|dir| logpipe_render::config::expand_path(dir))
            .find(|dir| dir.join(format!("{plugin_type}.tera")).is_file());
        let note = origin.map_or_else(|| "builtin".to_string(), |dir| dir.display().to_string());
        output::item(plugin_type, Some(note.as_str()));
    }
}
