pub mod map;

pub mod popup {
    use crate::{AsHtmlExt, Error};
    use web_sys::Element;

    /// Popup body for a marker: the title in bold, then one row per content
    /// line. Text only, server strings never reach `innerHTML`.
    pub fn card(title: &str, content: &str) -> Result<Element, Error> {
        let card = "div".as_html()?;
        card.set_class_name("entry-card");

        let heading = "strong".as_html()?;
        heading.set_text_content(Some(title));
        card.append_with_node_1(&heading)?;

        for line in content.lines().filter(|l| !l.trim().is_empty()) {
            let row = "div".as_html()?;
            row.set_text_content(Some(line));
            card.append_with_node_1(&row)?;
        }

        Ok(card)
    }
}
