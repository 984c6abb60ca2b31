//! Per-slide presentation roles.
//!
//! The gallery layers its slides: the active slide on top, its neighbours
//! peeking out beneath it, everything else at the back. The carousel only
//! tracks an index; these helpers derive what each slide should look like.

/// How a slide is presented relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideRole {
    /// The slide being shown.
    Active,
    /// The slide after the active one (wrapping).
    Next,
    /// The slide before the active one (wrapping).
    Previous,
    /// Any other slide.
    Hidden,
}

impl SlideRole {
    /// Stacking order for this role; higher is drawn on top.
    pub fn z_index(self) -> u8 {
        match self {
            Self::Active => 3,
            Self::Next | Self::Previous => 2,
            Self::Hidden => 1,
        }
    }

    /// Whether this is the active slide.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// The CSS class the rendering layer applies, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Active => Some("active"),
            Self::Next => Some("next"),
            Self::Previous => Some("prev"),
            Self::Hidden => None,
        }
    }
}

/// Role of slide `index` when `current` is active among `count` slides.
///
/// When the next and previous neighbour are the same slide (two slides),
/// it is reported as [`SlideRole::Next`].
pub fn role_of(index: usize, current: usize, count: usize) -> SlideRole {
    if count == 0 || index >= count {
        return SlideRole::Hidden;
    }
    if index == current {
        SlideRole::Active
    } else if index == (current + 1) % count {
        SlideRole::Next
    } else if index == (current + count - 1) % count {
        SlideRole::Previous
    } else {
        SlideRole::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_wrap_around() {
        let roles: Vec<_> = (0..5).map(|i| role_of(i, 0, 5)).collect();
        assert_eq!(
            roles,
            vec![
                SlideRole::Active,
                SlideRole::Next,
                SlideRole::Hidden,
                SlideRole::Hidden,
                SlideRole::Previous,
            ]
        );
    }

    #[test]
    fn test_small_carousels() {
        assert_eq!(role_of(0, 0, 1), SlideRole::Active);
        assert_eq!(role_of(1, 0, 2), SlideRole::Next);
        assert_eq!(role_of(0, 1, 2), SlideRole::Next);
        assert_eq!(role_of(3, 0, 2), SlideRole::Hidden);
    }

    #[test]
    fn test_z_index_and_class() {
        assert_eq!(SlideRole::Active.z_index(), 3);
        assert_eq!(SlideRole::Previous.z_index(), 2);
        assert_eq!(SlideRole::Hidden.z_index(), 1);
        assert_eq!(SlideRole::Previous.css_class(), Some("prev"));
        assert_eq!(SlideRole::Hidden.css_class(), None);
    }
}
