pub mod element;
pub mod hit;
pub mod html;
pub mod layout;
pub mod types;

pub use element::{
    descendants, find_by_class, find_by_name, find_by_name_mut, find_element, find_element_mut,
    find_first_mut, for_each_mut, split_classes, Content, Element,
};
pub use hit::{hit_test_any, hit_test_tag};
pub use html::{parse_fragment, to_html, ParseError};
pub use layout::{LayoutResult, Rect};
pub use types::Style;
