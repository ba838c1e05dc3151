//! Element name tables and classification helpers

use phf::phf_set;

use crate::ast::{Element, Namespace};

static HTML_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "html", "body", "base", "head", "link", "meta", "style", "title", "address", "article",
    "aside", "footer", "header", "h1", "h2", "h3", "h4", "h5", "h6", "hgroup", "nav",
    "section", "div", "dd", "dl", "dt", "figcaption", "figure", "picture", "hr", "img", "li",
    "main", "ol", "p", "pre", "ul", "a", "b", "abbr", "bdi", "bdo", "br", "cite", "code",
    "data", "dfn", "em", "i", "kbd", "mark", "q", "rp", "rt", "rtc", "ruby", "s", "samp",
    "small", "span", "strong", "sub", "sup", "time", "u", "var", "wbr", "area", "audio", "map",
    "track", "video", "embed", "object", "param", "source", "canvas", "script", "noscript",
    "del", "ins", "caption", "col", "colgroup", "table", "thead", "tbody", "td", "th", "tr",
    "button", "datalist", "fieldset", "form", "input", "label", "legend", "meter", "optgroup",
    "option", "output", "progress", "select", "textarea", "details", "dialog", "menu",
    "menuitem", "summary", "content", "element", "shadow", "template", "blockquote", "iframe",
    "tfoot", "slot", "search",
};

static SVG_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "a", "animate", "animateMotion", "animateTransform", "audio", "canvas", "circle",
    "clipPath", "defs", "desc", "discard", "ellipse", "feBlend", "feColorMatrix",
    "feComponentTransfer", "feComposite", "feConvolveMatrix", "feDiffuseLighting",
    "feDisplacementMap", "feDistantLight", "feDropShadow", "feFlood", "feFuncA", "feFuncB",
    "feFuncG", "feFuncR", "feGaussianBlur", "feImage", "feMerge", "feMergeNode",
    "feMorphology", "feOffset", "fePointLight", "feSpecularLighting", "feSpotLight", "feTile",
    "feTurbulence", "filter", "foreignObject", "g", "iframe", "image", "line",
    "linearGradient", "marker", "mask", "metadata", "mpath", "path", "pattern", "polygon",
    "polyline", "radialGradient", "rect", "script", "set", "stop", "style", "svg", "switch",
    "symbol", "text", "textPath", "title", "tspan", "unknown", "use", "video", "view",
};

static MATH_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "math", "maction", "annotation", "annotation-xml", "menclose", "merror", "mfenced",
    "mfrac", "mi", "mmultiscripts", "mn", "mo", "mover", "mpadded", "mphantom", "mprescripts",
    "mroot", "mrow", "ms", "semantics", "mspace", "msqrt", "mstyle", "msub", "msup",
    "msubsup", "mtable", "mtd", "mtext", "mtr", "munder", "munderover",
};

static VOID_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
};

/// Framework components that are always available without registration
static BUILT_IN_COMPONENTS: phf::Set<&'static str> = phf_set! {
    "template", "slot", "component", "transition", "transition-group", "keep-alive",
    "teleport", "suspense", "Transition", "TransitionGroup", "KeepAlive", "Teleport",
    "Suspense", "Component", "Slot",
};

pub fn is_html_element(name: &str) -> bool {
    HTML_ELEMENTS.contains(name)
}

pub fn is_svg_element(name: &str) -> bool {
    SVG_ELEMENTS.contains(name)
}

pub fn is_math_element(name: &str) -> bool {
    MATH_ELEMENTS.contains(name)
}

pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(name)
}

pub fn is_built_in_component(name: &str) -> bool {
    BUILT_IN_COMPONENTS.contains(name)
}

/// Whether an element is a user component rather than a platform element.
///
/// An element counts as a component when its tag is unknown for its namespace,
/// or when it is rendered dynamically through an `is` / `:is` attribute.
pub fn is_custom_component(element: &Element<'_>) -> bool {
    let known = match element.namespace {
        Namespace::Html => is_html_element(element.raw_name),
        Namespace::Svg => is_svg_element(element.raw_name),
        Namespace::MathMl => is_math_element(element.raw_name),
    };
    !known
        || element.has_attribute("is")
        || element.directive("bind", Some("is")).is_some()
}
