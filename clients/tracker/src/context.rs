use typed_builder::TypedBuilder;

/// What the runtime can see of the hosting page at activation time.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct PageContext {
    #[builder(setter(into))]
    pub url: String,
    #[builder(default, setter(into))]
    pub title: String,
    #[builder(default, setter(into))]
    pub referrer: String,
    /// `src` attributes of every script element, in document order.
    #[builder(default)]
    pub script_sources: Vec<String>,
    /// Absolute `src` of the script currently executing, if known.
    #[builder(default, setter(into, strip_option))]
    pub current_script_src: Option<String>,
}
