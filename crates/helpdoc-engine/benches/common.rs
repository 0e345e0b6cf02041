// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_help_comment(sections: usize) -> String {
    let mut content = String::from("%BENCH Benchmark help comment\n%\n");
    let section = "\
% R = BENCH(X, Y) computes something from X and Y with a 3x3 result.
% More prose about X^2 continues on this line.
%
% Options::
%  'deg'      angles in degrees
%  'rad'      angles in radians
%             (the default)
%
% Notes::
% - First point
%   - nested point
% - Second point
%
% Example::
%         R = bench(1, 2)
%
%         disp(R)
%
";
    for _ in 0..sections {
        content.push_str(section);
    }
    content.push_str("% See also ROTX, SE3, Quaternion.plot.\n");
    content
}
