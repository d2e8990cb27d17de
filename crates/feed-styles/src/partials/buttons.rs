pub(super) const ID: &str = "styles/buttons";

stylecomp::partial! {
    /// Push buttons and icon buttons.
    pub fn buttons() = (ID, r#"
button, .btn {
  display: inline-flex;
  align-items: center;
  gap: 4px;
  padding: 4px 12px;
  border: 1px solid var(--border-color--default);
  border-radius: 4px;
  background: var(--bg-color--default);
  color: var(--text-color--default);
  font: inherit;
  cursor: pointer;
}

button:hover, .btn:hover {
  border-color: var(--accent-color);
}

button:disabled, .btn:disabled {
  cursor: default;
  opacity: 0.5;
}

/* primary action */
.btn--primary {
  border-color: var(--accent-color);
  background: var(--accent-color);
  color: var(--accent-text-color);
}

.btn--icon {
  padding: 2px;
  border: none;
  background: transparent;
}
"#);
}
