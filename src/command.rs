#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  Back,
  CollapseComment,
  ExpandComment,
  Forward,
  HideHelp,
  None,
  OpenLink,
  OpenProfile,
  OpenStory,
  PageDown,
  PageUp,
  Quit,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  SwitchFeedLeft,
  SwitchFeedRight,
  ToggleComment,
}
