pub(super) const ID: &str = "styles/tooltips";

stylecomp::partial! {
    /// Hover tooltips driven by a `data-tooltip` attribute.
    pub fn tooltips() = (ID, r#"
[data-tooltip] {
  position: relative;
}

[data-tooltip]::after {
  content: attr(data-tooltip);
  position: absolute;
  bottom: 100%;
  left: 50%;
  transform: translateX(-50%);
  padding: 2px 8px;
  border-radius: 3px;
  background: var(--tooltip-bg-color);
  color: var(--tooltip-text-color);
  box-shadow: 0 1px 3px var(--shadow-color);
  font-size: 12px;
  white-space: nowrap;
  visibility: hidden;
}

[data-tooltip]:hover::after {
  visibility: visible;
}
"#);
}
