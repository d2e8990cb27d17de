pub(super) const ID: &str = "styles/spinner";

// Partials cannot reference bundled files, so the image itself is supplied
// by the component that shows the spinner.
stylecomp::partial! {
    /// Box for an inline loading indicator.
    pub fn spinner() = (ID, r#"
.spinner {
  display: inline-block;
  width: 16px;
  height: 16px;
  background-repeat: no-repeat;
  background-position: center;
  background-size: contain;
  vertical-align: middle;
}
"#);
}
