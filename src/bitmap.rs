use crate::error::{Result, ViewerError};

/// Fields of the `BITMAPINFOHEADER` handed to GDI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DibHeader {
    pub width: i32,
    /// Negative: rows are stored top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
}

impl DibHeader {
    pub fn top_down_32bpp(width: u32, height: u32) -> Result<Self> {
        let w = i32::try_from(width)
            .map_err(|_| ViewerError::Bitmap(format!("width {width} out of range")))?;
        let h = i32::try_from(height)
            .map_err(|_| ViewerError::Bitmap(format!("height {height} out of range")))?;
        Ok(Self {
            width: w,
            height: -h,
            planes: 1,
            bit_count: 32,
            x_pels_per_meter: 10,
            y_pels_per_meter: 10,
        })
    }

    /// 32bpp rows never need DWORD padding.
    pub fn stride(&self) -> usize {
        self.width.unsigned_abs() as usize * 4
    }

    pub fn image_size(&self) -> usize {
        self.stride() * self.height.unsigned_abs() as usize
    }
}

/// A BGRA8 frame ready for `CreateDIBitmap`.
#[derive(Debug)]
pub struct BgraImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl BgraImage {
    pub fn header(&self) -> Result<DibHeader> {
        let header = DibHeader::top_down_32bpp(self.width, self.height)?;
        if header.image_size() != self.pixels.len() {
            return Err(ViewerError::Bitmap(format!(
                "{} bytes of pixels for a {}x{} bitmap",
                self.pixels.len(),
                self.width,
                self.height
            )));
        }
        Ok(header)
    }
}

#[cfg(windows)]
pub use gdi::create_dib;

#[cfg(windows)]
mod gdi {
    use super::BgraImage;
    use crate::error::{Result, ViewerError};
    use std::ffi::c_void;
    use windows::Win32::Graphics::Gdi::{
        BI_RGB, BITMAPINFO, BITMAPINFOHEADER, CBM_INIT, CreateDIBitmap, DIB_RGB_COLORS, GetDC,
        HBITMAP, ReleaseDC,
    };

    /// Creates a screen-compatible bitmap from `image`.
    pub fn create_dib(image: &BgraImage) -> Result<HBITMAP> {
        let header = image.header()?;

        let bmih = BITMAPINFOHEADER {
            biSize: size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: header.width,
            biHeight: header.height,
            biPlanes: header.planes,
            biBitCount: header.bit_count,
            biCompression: BI_RGB.0,
            biSizeImage: 0,
            biXPelsPerMeter: header.x_pels_per_meter,
            biYPelsPerMeter: header.y_pels_per_meter,
            biClrUsed: 0,
            biClrImportant: 0,
        };
        let bmi = BITMAPINFO {
            bmiHeader: bmih,
            ..Default::default()
        };

        unsafe {
            let hdc = GetDC(None);
            if hdc.is_invalid() {
                return Err(ViewerError::Bitmap("GetDC(NULL) failed".into()));
            }
            let hbmp = CreateDIBitmap(
                hdc,
                Some(&bmih as *const BITMAPINFOHEADER),
                CBM_INIT as u32,
                Some(image.pixels.as_ptr() as *const c_void),
                Some(&bmi as *const BITMAPINFO),
                DIB_RGB_COLORS,
            );
            ReleaseDC(None, hdc);

            if hbmp.is_invalid() {
                return Err(ViewerError::Bitmap("CreateDIBitmap failed".into()));
            }
            Ok(hbmp)
        }
    }
}
