// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use dioxus::prelude::*;

/// Short explanation of the technique, shown below the image columns.
#[component]
pub fn About() -> Element {
    rsx! {
        section { style: "margin: 24px 0; padding-top: 16px; border-top: 1px solid #e0e0e0;",
            h3 { "What is CLAHE?" }
            p { style: "color: #444; font-size: 14px; line-height: 1.5;",
                "Contrast Limited Adaptive Histogram Equalization (CLAHE) improves contrast "
                "locally. The image is split into a grid of tiles and each tile gets its own "
                "histogram equalization, so dark and bright regions are both enhanced."
            }
            ul { style: "color: #444; font-size: 14px; line-height: 1.5;",
                li { b { "Clip Limit: " } "caps how far any gray level may be stretched. Higher values add contrast but also amplify noise." }
                li { b { "Tile Grid Size: " } "the number of tile rows and columns. More tiles respond to smaller details." }
            }
            p { style: "color: #666; font-size: 14px;",
                "Tile borders are blended with bilinear interpolation, so no seams appear. "
                "The result is a grayscale image of the same size as the upload."
            }
        }
    }
}
