pub(super) const ID: &str = "styles/inputs";

stylecomp::partial! {
    /// Text inputs and the reply composer's textarea.
    pub fn inputs() = (ID, r#"
input, textarea {
  box-sizing: border-box;
  width: 100%;
  padding: 4px 8px;
  border: 1px solid var(--border-color--default);
  border-radius: 4px;
  background: var(--bg-color--default);
  color: var(--text-color--default);
  font: inherit;
}

input:focus, textarea:focus {
  outline: none;
  border-color: var(--accent-color);
}

textarea {
  min-height: 60px;
  resize: vertical;
}
"#);
}
