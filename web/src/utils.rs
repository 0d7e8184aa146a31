use pokematch_core::Seconds;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attatch the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Seed drawn from JavaScript's Math.random, 32 bits at a time.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let word = || (random() * f64::from(u32::MAX)) as u64;
    (word() << 32) | word()
}

/// `mm:ss`, minutes are not capped.
pub(crate) fn format_time(secs: Seconds) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(7), "00:07");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(6000), "100:00");
    }
}
