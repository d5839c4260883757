#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::Path;

const LICENSE: &str = "\
/*
 *  Copyright (c) 2012 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

";

const CODEC_H: &str = "\
#ifndef WEBRTC_VIDEO_MAIN_CODEC_H
#define WEBRTC_VIDEO_MAIN_CODEC_H

#include \"typedefs.h\"

/*
 * Encodes one frame.
 */
int EncodeFrame(int frameSize, char* _buffer);

#endif  // WEBRTC_VIDEO_MAIN_CODEC_H
";

const CODEC_H_EXPECTED: &str = "\
#ifndef WEBRTC_VIDEO_CODEC_H_
#define WEBRTC_VIDEO_CODEC_H_

#include \"webrtc/typedefs.h\"

// Encodes one frame.
int EncodeFrame(int frame_size, char* buffer_);

#endif  // WEBRTC_VIDEO_CODEC_H_
";

const CODEC_CC: &str = "\
#include <string.h>
#include \"webrtc/video/codec.h\"
#include \"video/other.h\"
#include <assert.h>

namespace webrtc {

int EncodeFrame(int frameSize, char* _buffer) {
  for (int i = 0; i < frameSize; i++) {
    _buffer[i] = 0;
  }
  return frameSize;
}

}  // namespace webrtc
";

const CODEC_CC_EXPECTED: &str = "\
#include \"webrtc/video/codec.h\"

#include <assert.h>
#include <string.h>

#include \"webrtc/video/other.h\"

namespace webrtc {

int EncodeFrame(int frame_size, char* buffer_) {
  for (int i = 0; i < frame_size; ++i) {
    buffer_[i] = 0;
  }
  return frame_size;
}

}  // namespace webrtc
";

fn restyle_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("restyle").unwrap();
	cmd.env("RESTYLE_NO_USER_CONFIG", "1").env_remove("RUST_LOG");
	cmd
}

fn write(base: &Path, rel: &str, content: &str) {
	let path = base.join(rel);
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	fs::write(path, content).unwrap();
}

/// A project tree with a header, its source file and a top-level header.
fn sample_project() -> tempfile::TempDir {
	let temp_dir = tempfile::tempdir().unwrap();
	let base = temp_dir.path();

	write(base, "webrtc/typedefs.h", "");
	write(base, "webrtc/video/codec.h", &format!("{}{}", LICENSE, CODEC_H));
	write(base, "webrtc/video/codec.cc", &format!("{}{}", LICENSE, CODEC_CC));

	temp_dir
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	restyle_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("migrating C/C++ sources"));
}

#[test]
fn test_version_flag() {
	restyle_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("restyle"));
}

#[test]
fn test_no_args_shows_usage() {
	restyle_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_flags_without_files_is_usage_error() {
	let temp_dir = tempfile::tempdir().unwrap();

	restyle_cmd()
		.arg("--verbose")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("no input files"));
}

// ============================================================================
// --init / --show-config tests
// ============================================================================

#[test]
fn test_init_creates_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".restyle.toml");

	restyle_cmd()
		.arg("--init")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Created .restyle.toml"));

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
	assert!(content.contains("project-root = \"webrtc\""));
}

#[test]
fn test_init_fails_if_exists() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".restyle.toml"), "# existing").unwrap();

	restyle_cmd()
		.arg("--init")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_overwrites() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".restyle.toml");
	fs::write(&config_path, "# existing").unwrap();

	restyle_cmd()
		.args(["--init", "--force"])
		.current_dir(temp_dir.path())
		.assert()
		.success();

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
}

#[test]
fn test_show_config_defaults() {
	let temp_dir = tempfile::tempdir().unwrap();

	restyle_cmd()
		.arg("--show-config")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("project-root: webrtc"))
		.stdout(predicate::str::contains("guard-prefix: WEBRTC_"))
		.stdout(predicate::str::contains("sort-includes (on)"));
}

#[test]
fn test_show_config_reads_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".restyle.toml"),
		"root = true\nproject-root = \"talk\"\nskip = [\"comment-style\"]\n",
	)
	.unwrap();

	restyle_cmd()
		.arg("--show-config")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains(".restyle.toml"))
		.stdout(predicate::str::contains("project-root: talk"))
		.stdout(predicate::str::contains("guard-prefix: TALK_"))
		.stdout(predicate::str::contains("comment-style (off)"));
}

#[test]
fn test_invalid_config_fails() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".restyle.toml"), "invalid toml [[[").unwrap();
	write(temp_dir.path(), "a.cc", "int x;\n");

	restyle_cmd()
		.arg("a.cc")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to load configuration"));
}

// ============================================================================
// Migration tests
// ============================================================================

#[test]
fn test_migrates_source_and_header() {
	let project = sample_project();
	let base = project.path();

	restyle_cmd()
		.args(["webrtc/video/codec.cc", "webrtc/video/codec.h"])
		.current_dir(base)
		.assert()
		.success()
		.stdout(predicate::str::contains("webrtc/video/codec.cc done."))
		.stdout(predicate::str::contains("webrtc/video/codec.h done."));

	let header = fs::read_to_string(base.join("webrtc/video/codec.h")).unwrap();
	assert_eq!(header, format!("{}{}", LICENSE, CODEC_H_EXPECTED));

	let source = fs::read_to_string(base.join("webrtc/video/codec.cc")).unwrap();
	assert_eq!(source, format!("{}{}", LICENSE, CODEC_CC_EXPECTED));
}

#[test]
fn test_second_run_changes_nothing() {
	let project = sample_project();
	let base = project.path();
	let files = ["webrtc/video/codec.cc", "webrtc/video/codec.h"];

	restyle_cmd().args(files).current_dir(base).assert().success();
	let first: Vec<String> = files
		.iter()
		.map(|f| fs::read_to_string(base.join(f)).unwrap())
		.collect();

	restyle_cmd().args(files).current_dir(base).assert().success();
	let second: Vec<String> = files
		.iter()
		.map(|f| fs::read_to_string(base.join(f)).unwrap())
		.collect();

	assert_eq!(first, second);
}

#[test]
fn test_base_dir_flag() {
	let project = sample_project();
	let header = project.path().join("webrtc/video/codec.h");
	let elsewhere = tempfile::tempdir().unwrap();

	restyle_cmd()
		.arg("--base-dir")
		.arg(project.path())
		.arg(&header)
		.current_dir(elsewhere.path())
		.assert()
		.success();

	let content = fs::read_to_string(&header).unwrap();
	assert!(content.contains("#include \"webrtc/typedefs.h\""));
	assert!(content.contains("#define WEBRTC_VIDEO_CODEC_H_"));
}

#[test]
fn test_unsortable_includes_warn_and_continue() {
	let temp_dir = tempfile::tempdir().unwrap();
	let text = "#ifdef WEBRTC_LINUX\n#include <b.h>\n#include <a.h>\n#endif\nint someValue;\n";
	write(temp_dir.path(), "main.cc", text);

	restyle_cmd()
		.arg("main.cc")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"WARNING: Include headers not sorted in main.cc",
		))
		.stdout(predicate::str::contains("main.cc done."));

	let content = fs::read_to_string(temp_dir.path().join("main.cc")).unwrap();
	assert_eq!(
		content,
		"#ifdef WEBRTC_LINUX\n#include <b.h>\n#include <a.h>\n#endif\nint some_value;\n"
	);
}

#[test]
fn test_missing_file_does_not_stop_batch() {
	let temp_dir = tempfile::tempdir().unwrap();
	write(temp_dir.path(), "ok.cc", "int fooBar;\n");

	restyle_cmd()
		.args(["missing.cc", "ok.cc"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stderr(predicate::str::contains("skipping missing.cc"))
		.stdout(predicate::str::contains("ok.cc done."));

	let content = fs::read_to_string(temp_dir.path().join("ok.cc")).unwrap();
	assert_eq!(content, "int foo_bar;\n");
}

#[test]
fn test_skip_config_disables_stage() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".restyle.toml"),
		"root = true\npreserved-lines = 0\nskip = [\"comment-style\"]\n",
	)
	.unwrap();
	write(temp_dir.path(), "a.cc", "/* keep */\nint _count;\n");

	restyle_cmd()
		.arg("a.cc")
		.current_dir(temp_dir.path())
		.assert()
		.success();

	let content = fs::read_to_string(temp_dir.path().join("a.cc")).unwrap();
	assert_eq!(content, "/* keep */\nint count_;\n");
}

#[test]
fn test_verbose_logs_stages_to_stderr() {
	let temp_dir = tempfile::tempdir().unwrap();
	write(temp_dir.path(), "a.cc", "int fooBar;\n");

	restyle_cmd()
		.args(["--verbose", "a.cc"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("a.cc done."))
		.stdout(predicate::str::contains("stage applied").not())
		.stderr(predicate::str::contains("stage applied"));
}
