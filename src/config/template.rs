/// Contents written by `restyle --init`.
pub fn generate_init_template() -> &'static str {
	r#"# restyle configuration
# Files are discovered from the current directory upwards; the nearest
# file wins per key. `root = true` stops the search at this file.
root = true

# Directory (under the base directory) holding the project tree.
# Bare includes are resolved against it and legacy paths get it as prefix.
project-root = "webrtc"

# Include guards become <guard-prefix><PATH>_, e.g. WEBRTC_VIDEO_CODEC_H_.
# Defaults to the project root uppercased plus "_".
# guard-prefix = "WEBRTC_"

# Leading lines (the license header) left untouched by comment conversion.
preserved-lines = 10

# Files with this extension also get their include guard fixed.
header-extension = "h"

# Stages to disable. Available: decamelize, move-underscore, loop-increment,
# comment-style, header-path, legacy-prefix, sort-includes, include-guard.
skip = []
"#
}
