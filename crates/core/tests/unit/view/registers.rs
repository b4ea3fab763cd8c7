use pipedash_core::common::{REGISTER_COUNT, REGISTER_NAMES};
use pipedash_core::view::registers::render;
use proptest::prelude::*;

proptest! {
    #[test]
    fn highlight_iff_changed(
        values in prop::array::uniform16(any::<u32>()),
        changed in prop::array::uniform16(any::<bool>()),
    ) {
        let panel = render(&values, &changed);
        prop_assert_eq!(panel.slots.len(), REGISTER_COUNT);
        for (i, slot) in panel.slots.iter().enumerate() {
            prop_assert_eq!(slot.name, REGISTER_NAMES[i]);
            prop_assert_eq!(slot.value, values[i]);
            prop_assert_eq!(slot.highlighted, changed[i]);
        }
        prop_assert_eq!(
            panel.highlighted().count(),
            changed.iter().filter(|&&c| c).count()
        );
    }
}

#[test]
fn test_nothing_highlighted_after_reset() {
    let panel = render(&[0; REGISTER_COUNT], &[false; REGISTER_COUNT]);
    assert_eq!(panel.highlighted().count(), 0);
}
