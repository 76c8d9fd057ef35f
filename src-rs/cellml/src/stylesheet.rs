use owo_colors::Style;

pub const ERROR_COLOR: Style = Style::new().red();
pub const NOTE_COLOR: Style = Style::new().blue();
pub const HELP_COLOR: Style = Style::new().blue();
pub const SOURCE_ANNOTATION: Style = Style::new().blue().bold();

pub const MODEL_NAME: Style = Style::new().cyan().bold();
pub const COMPONENT_NAME: Style = Style::new().green();
pub const CYCLE_NOTE: Style = Style::new().yellow().italic();
