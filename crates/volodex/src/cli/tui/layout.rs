use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Narrow,
    Short,
    Normal,
}

pub fn viewport_class(area: Rect) -> ViewportClass {
    let narrow = area.width < 80;
    let short = area.height < 20;

    if narrow {
        ViewportClass::Narrow
    } else if short {
        ViewportClass::Short
    } else {
        ViewportClass::Normal
    }
}

impl ViewportClass {
    /// Short and narrow terminals drop the activity log.
    pub fn shows_activity(self) -> bool {
        self == ViewportClass::Normal
    }

    /// Narrow terminals stack the detail pane under the lists.
    pub fn stacks_detail(self) -> bool {
        self == ViewportClass::Narrow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_classes() {
        assert_eq!(viewport_class(Rect::new(0, 0, 60, 40)), ViewportClass::Narrow);
        assert_eq!(viewport_class(Rect::new(0, 0, 120, 16)), ViewportClass::Short);
        assert_eq!(viewport_class(Rect::new(0, 0, 120, 40)), ViewportClass::Normal);
        assert!(!ViewportClass::Short.shows_activity());
        assert!(ViewportClass::Narrow.stacks_detail());
    }
}
