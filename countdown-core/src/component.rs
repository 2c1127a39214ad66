//! The contract every panel widget implements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A widget that draws from borrowed props and answers events with actions.
///
/// It never writes app state. Whatever it needs to draw arrives in `Props`;
/// the only state it keeps is local UI detail such as a cursor position or
/// the area last drawn, which mouse clicks are tested against.
///
/// Focus is passed through `Props`, so components never need to know how the
/// app tracks it.
///
/// ```ignore
/// use countdown_core::{Component, EventKind, Frame, Rect};
///
/// struct StartButton;
///
/// struct StartButtonProps {
///     is_focused: bool,
/// }
///
/// impl Component<AppAction> for StartButton {
///     type Props<'a> = StartButtonProps;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> impl IntoIterator<Item = AppAction> {
///         match event {
///             EventKind::Key(key) if props.is_focused && key.code == KeyCode::Enter => {
///                 Some(AppAction::CounterStart)
///             }
///             _ => None,
///         }
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new("[ Start ]"), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Borrowed view of whatever the widget draws
    type Props<'a>;

    /// Actions for `event`, usually `None` or a single `Some`.
    ///
    /// Display-only widgets keep the default, which ignores everything.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
