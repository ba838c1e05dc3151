//! Template and script lint rules
//!
//! Rules ported from eslint-plugin-vue

pub mod custom_event_name_casing;
pub mod html_closing_bracket_newline;
pub mod html_self_closing;
pub mod mustache_interpolation_spacing;
pub mod no_deprecated_destroyed_lifecycle;
pub mod no_deprecated_v_bind_sync;
pub mod no_deprecated_v_on_number_modifiers;
pub mod no_dupe_v_else_if;
pub mod no_duplicate_attributes;
pub mod no_negated_v_if_condition;
pub mod no_ref_as_operand;
pub mod no_setup_props_reactivity_loss;
pub mod no_template_shadow;
pub mod no_unused_vars;
pub mod no_use_v_if_with_v_for;
pub mod require_v_for_key;
pub mod singleline_html_element_content_newline;
pub mod this_in_template;
pub mod v_bind_style;
pub mod v_on_function_call;
pub mod v_on_style;
pub mod valid_v_else;

// Re-export rule structs
pub use custom_event_name_casing::CustomEventNameCasing;
pub use html_closing_bracket_newline::HtmlClosingBracketNewline;
pub use html_self_closing::HtmlSelfClosing;
pub use mustache_interpolation_spacing::MustacheInterpolationSpacing;
pub use no_deprecated_destroyed_lifecycle::NoDeprecatedDestroyedLifecycle;
pub use no_deprecated_v_bind_sync::NoDeprecatedVBindSync;
pub use no_deprecated_v_on_number_modifiers::NoDeprecatedVOnNumberModifiers;
pub use no_dupe_v_else_if::NoDupeVElseIf;
pub use no_duplicate_attributes::NoDuplicateAttributes;
pub use no_negated_v_if_condition::NoNegatedVIfCondition;
pub use no_ref_as_operand::NoRefAsOperand;
pub use no_setup_props_reactivity_loss::NoSetupPropsReactivityLoss;
pub use no_template_shadow::NoTemplateShadow;
pub use no_unused_vars::NoUnusedVars;
pub use no_use_v_if_with_v_for::NoUseVIfWithVFor;
pub use require_v_for_key::RequireVForKey;
pub use singleline_html_element_content_newline::SinglelineHtmlElementContentNewline;
pub use this_in_template::ThisInTemplate;
pub use v_bind_style::VBindStyle;
pub use v_on_function_call::VOnFunctionCall;
pub use v_on_style::VOnStyle;
pub use valid_v_else::ValidVElse;
