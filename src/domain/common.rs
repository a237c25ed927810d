/// Short human-readable label, used in tables and log fields.
pub trait Displayable {
    fn display_label(&self) -> String;
}
