use typed_builder::TypedBuilder;

/// Element that received a click.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct ElementSnapshot {
    #[builder(default, setter(into, strip_option))]
    pub tag_name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub id: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub class_name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub text_content: Option<String>,
}

/// The form an input belongs to.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct OwnerForm {
    #[builder(default, setter(into, strip_option))]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct InputSnapshot {
    #[builder(default = "INPUT".to_string(), setter(into))]
    pub tag_name: String,
    #[builder(setter(into))]
    pub input_type: String,
    #[builder(default, setter(into, strip_option))]
    pub id: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub name: Option<String>,
    #[builder(default, setter(into))]
    pub value: String,
    #[builder(default, setter(strip_option))]
    pub form: Option<OwnerForm>,
}

impl InputSnapshot {
    pub(crate) fn is_filled_email(&self) -> bool {
        self.tag_name.eq_ignore_ascii_case("input")
            && self.input_type.eq_ignore_ascii_case("email")
            && !self.value.is_empty()
    }
}

/// Submitted form along with its inputs.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct FormSnapshot {
    #[builder(default, setter(into, strip_option))]
    pub id: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub action: Option<String>,
    #[builder(default)]
    pub inputs: Vec<InputSnapshot>,
}

/// Document-level interactions the runtime listens for.
#[derive(Debug, Clone)]
pub enum DomEvent {
    Click(ElementSnapshot),
    Submit(FormSnapshot),
    Change(InputSnapshot),
}

/// `Some("")` counts as absent, like an unset DOM attribute.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
