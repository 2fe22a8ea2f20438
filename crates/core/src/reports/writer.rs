//! Standalone HTML and plain-text report output.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use pfi_shared::RenderConfig;
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

use super::error::ReportError;
use super::html::escape_html;
use super::tree::ReportTree;

/// Stylesheet, script and inline style references placed in every document head.
pub const HTML_HEADER: &str = r##"
<link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/bootstrap/3.3.0/css/bootstrap.min.css">
<link rel="stylesheet" href="https://maxcdn.bootstrapcdn.com/bootstrap/3.3.0/css/bootstrap-theme.min.css">
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/jquery.tocify/1.9.0/stylesheets/jquery.tocify.css">

<script src="https://cdnjs.cloudflare.com/ajax/libs/jquery/2.1.1/jquery.min.js"></script>
<script src="https://maxcdn.bootstrapcdn.com/bootstrap/3.3.0/js/bootstrap.min.js"></script>
<script src="https://cdnjs.cloudflare.com/ajax/libs/jqueryui/1.11.2/jquery-ui.min.js"></script>
<script src="https://cdnjs.cloudflare.com/ajax/libs/jquery.tocify/1.9.0/javascripts/jquery.tocify.js"></script>
<script src="https://cdnjs.cloudflare.com/ajax/libs/floatthead/1.2.8/jquery.floatThead.min.js"></script>

<script>
$(document).ready(function() {
    $("table.table").floatThead();
    $('h2,h3,h4,h5,h6').css('display', 'inline-table').after('<a class="headerlink" href="#">^</a>');
    $("#toc").tocify({
        selectors: "h2,h3,h4,h5,h6",
        showAndHide: false,
        hashGenerator: "pretty",
        scrollHistory: true,
        extendPage: false
        });
});
</script>

<style>
.table-condensed>thead>tr>th,
.table-condensed>tbody>tr>th,
.table-condensed>tfoot>tr>th,
.table-condensed>thead>tr>td,
.table-condensed>tbody>tr>td,
.table-condensed>tfoot>tr>td {
    padding: 2px !important;
}

table.floatThead-table {
    border-top: none;
    border-bottom: none;
    background-color: #FFF;
}

.tocify {
   position: static;
   margin-left: 0;

   width: inherit;
   max-height: inherit;
}

.tocify-subheader {
    text-indent: 20px;
    display: inherit !important;
}

a.headerlink {
    color: #F2F2F2;
    padding: 0 4px 0 4px;
    text-decoration: none;
}

</style>
"##;

/// Mode of a newly written report before the process umask applies.
#[cfg(unix)]
pub const REPORT_FILE_MODE: u32 = 0o644;

/// Temporary file in `dir` created with the mode of a freshly created report.
fn report_temp_file(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(REPORT_FILE_MODE));
    }
    builder.tempfile_in(dir)
}

/// Writes report trees as HTML documents or plain text.
#[derive(Debug, Clone, Default)]
pub struct ReportWriter {
    config: RenderConfig,
}

impl ReportWriter {
    /// Creates a writer rendering with `config`.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Writes a complete HTML document for `tree` to `out`.
    ///
    /// `input_name` only labels the page title, header and footer.
    ///
    /// # Errors
    ///
    /// Returns any error from `out`.
    pub fn write_html<W: Write>(
        &self,
        out: &mut W,
        input_name: &str,
        tree: &ReportTree,
    ) -> io::Result<()> {
        let name = escape_html(input_name);
        write!(out, "<html><head><title>{name}</title>")?;
        out.write_all(HTML_HEADER.as_bytes())?;
        out.write_all(b"</head><body>\n")?;
        out.write_all(b"<div class=\"container\">\n<div class=\"row\">\n")?;
        writeln!(out, "<div class=\"page-header\"><h1>{name}</h1></div>")?;
        out.write_all(b"<div id=\"toc\"></div>\n")?;
        out.write_all(b"<div class=\"body\">\n")?;
        for line in tree.render_html(&self.config) {
            writeln!(out, "{line}")?;
        }
        out.write_all(b"</div>\n</div>\n</div>\n")?;
        out.write_all(b"<div class=\"footer\"><div class=\"container\"><div class=\"row\">\n")?;
        writeln!(out, "<p class=\"text-muted\">{name}</p>")?;
        out.write_all(b"<a class=\"headerlink\" href=\"#\">^top^</a>\n")?;
        out.write_all(b"</div></div></div>\n</body></html>\n")?;
        out.flush()
    }

    /// Writes the HTML document to `path` atomically.
    ///
    /// The document goes to a temporary file in the destination directory
    /// and is renamed over `path` once fully written and synced. On failure
    /// `path` is left untouched. A replaced report keeps its permissions; a
    /// new one gets `0o644` less the umask.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Io` if the temporary file cannot be created,
    /// written or persisted.
    pub fn write_html_file(
        &self,
        path: &Path,
        input_name: &str,
        tree: &ReportTree,
    ) -> Result<(), ReportError> {
        let io_err = |source: io::Error| ReportError::Io {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = report_temp_file(&dir).map_err(io_err)?;
        if let Ok(existing) = fs::metadata(path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(io_err)?;
        }
        debug!(tmp = %tmp.path().display(), "Writing report to temporary file");

        {
            let mut out = BufWriter::new(tmp.as_file_mut());
            self.write_html(&mut out, input_name, tree).map_err(io_err)?;
        }
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(path).map_err(|err| io_err(err.error))?;

        let bytes = fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);
        info!(path = %path.display(), bytes, "Wrote HTML report");
        Ok(())
    }

    /// Writes the text rendering of `tree` to `out`, one line at a time.
    ///
    /// # Errors
    ///
    /// Returns any error from `out`.
    pub fn write_text<W: Write>(&self, out: &mut W, tree: &ReportTree) -> io::Result<()> {
        for line in tree.render_text(&self.config) {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}
