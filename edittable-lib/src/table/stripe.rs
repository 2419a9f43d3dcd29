//! Even/odd striping of body rows

use edittable_dom::Element;

use crate::config::EditConfig;

/// Re-applies stripe classes by position and marks the last row.
pub fn restripe(rows: &mut [Element], config: &EditConfig) {
    let last = rows.len().checked_sub(1);
    for (position, row) in rows.iter_mut().enumerate() {
        row.remove_class(&config.even_class);
        row.remove_class(&config.odd_class);
        row.remove_class(&config.last_class);
        if position % 2 == 0 {
            row.add_class(config.even_class.clone());
        } else {
            row.add_class(config.odd_class.clone());
        }
        if Some(position) == last {
            row.add_class(config.last_class.clone());
        }
    }
}
